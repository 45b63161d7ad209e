use std::{
    fmt::{Debug, Display},
    ops::{AddAssign, SubAssign},
};

use num_traits::Num;

/// A tick count. Delta times decoded from a file are `u32`, merged timelines use `u64`.
pub trait MIDINum:
    Num + PartialOrd + PartialEq + AddAssign + SubAssign + Copy + Sized + Debug + Display + Send + Sync
{
}

impl MIDINum for u32 {}
impl MIDINum for u64 {}
