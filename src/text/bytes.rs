use crate::constants::{MAX_SENTINEL, SIZE_UNITS, ULONG_MAX};

use super::duration::rounded_fraction;
use super::number::write_u64;

/// Renders a byte count in the largest binary unit it reaches, with three
/// decimals, e.g. `2.000 MiB`. Counts below 1 KiB render as `N B` and the
/// unbounded value as `max`.
pub fn format_bytes(bytes: u64, machine_friendly: bool) -> String {
    let mut out = String::new();
    if machine_friendly {
        write_u64(&mut out, bytes);
        return out;
    }
    if bytes == ULONG_MAX {
        out.push_str(MAX_SENTINEL);
        return out;
    }

    let Some((iec, _, multiplier)) = SIZE_UNITS.iter().find(|(_, _, size)| bytes >= *size) else {
        write_u64(&mut out, bytes);
        out.push_str(" B");
        return out;
    };
    let (whole, thousandths) = rounded_fraction(bytes, *multiplier);
    write_u64(&mut out, whole);
    out.push('.');
    out.push_str(&format!("{thousandths:03}"));
    out.push(' ');
    out.push_str(iec);
    out
}
