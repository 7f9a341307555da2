//! Boolean combinators used by the comparator and the assertion surface.

#[inline]
pub const fn not(value: bool) -> bool {
    !value
}

/// `false` for an empty slice.
pub const fn or(values: &[bool]) -> bool {
    let mut i = 0;
    while i < values.len() {
        if values[i] {
            return true;
        }
        i += 1;
    }
    false
}

/// `true` for an empty slice.
pub const fn and(values: &[bool]) -> bool {
    let mut i = 0;
    while i < values.len() {
        if !values[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// True when both sides agree.
#[inline]
pub const fn eq(left: bool, right: bool) -> bool {
    if left { right } else { not(right) }
}

#[inline]
pub const fn xor(values: [bool; 2]) -> bool {
    not(eq(values[0], values[1]))
}
