pub mod struct_impl;
