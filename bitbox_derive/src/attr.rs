use syn::*;

/// How a derived struct crosses the wire.
#[derive(Clone, Copy, PartialEq)]
pub enum Mode {
    /// Field by field, in declaration order.
    Fields,
    /// The whole struct as one block of its raw bytes.
    Pod,
}

/// Reads `#[bitbox(...)]` attributes off the struct.
pub fn mode(ast: &DeriveInput) -> Result<Mode> {
    let mut mode = Mode::Fields;

    for attr in ast.attrs.iter().filter(|a| a.path().is_ident("bitbox")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("pod") {
                mode = Mode::Pod;
                Ok(())
            } else {
                Err(meta.error("bitbox: unknown attribute, expected `pod`"))
            }
        })?;
    }

    if mode == Mode::Pod && !ast.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &ast.generics,
            "bitbox: `#[bitbox(pod)]` structs cannot be generic",
        ));
    }

    Ok(mode)
}
