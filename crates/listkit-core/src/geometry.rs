#![forbid(unsafe_code)]

//! Geometric primitives.

/// The size a widget was given for the current event, in cells.
///
/// Key handlers receive it so paging keys can move by one screenful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Number of rows one page covers; never less than one.
    #[inline]
    pub const fn page_rows(&self) -> usize {
        if self.height == 0 {
            1
        } else {
            self.height as usize
        }
    }
}
