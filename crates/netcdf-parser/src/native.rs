//! Helpers around the native netcdf library.

use std::sync::Once;

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints diagnostic stacks to stderr even when an error
/// is handled on the Rust side (for example when probing for an optional
/// attribute). Call this once before opening files; later calls are no-ops.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and passing null handlers is a
        // documented way to disable automatic error printing.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
pub(crate) fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// String attribute of a variable.
pub(crate) fn get_string_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

/// String-valued global attribute.
pub(crate) fn get_global_string_attr(file: &netcdf::File, name: &str) -> Option<String> {
    if !file.attributes().any(|attr| attr.name() == name) {
        return None;
    }
    match file.attribute(name)?.value().ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

/// Integer-valued global attribute.
pub(crate) fn get_global_i32_attr(file: &netcdf::File, name: &str) -> Option<i32> {
    if !file.attributes().any(|attr| attr.name() == name) {
        return None;
    }
    let value = file.attribute(name)?.value().ok()?;
    i32::try_from(value).ok()
}
