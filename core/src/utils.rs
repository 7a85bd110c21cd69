use std::fmt;
use num_enum::TryFromPrimitive;

/// Render a raw code as its enum variant name, or as hex when it is not a
/// known variant.
pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

/// Worker count for batch compression: requested value, else one per core,
/// clamped to `1..=jobs`.
pub fn effective_workers(requested: Option<usize>, jobs: usize) -> usize {
    let wanted = requested.unwrap_or_else(num_cpus::get);
    wanted.clamp(1, jobs.max(1))
}
