// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # By-Value Saturating Arithmetic
//!
//! Trait-per-operation saturating arithmetic taking operands by value.
//! Generic solver code composes times and bounds near the extremes of the
//! integer range (e.g., an "unbounded" incumbent starts at `T::MAX`);
//! saturating semantics keep that arithmetic total without branching on
//! overflow at every call site.

/// Saturating addition by value.
pub trait SaturatingAddVal: Sized {
    fn saturating_add_val(self, rhs: Self) -> Self;
}

/// Saturating subtraction by value.
pub trait SaturatingSubVal: Sized {
    fn saturating_sub_val(self, rhs: Self) -> Self;
}

/// Saturating multiplication by value.
pub trait SaturatingMulVal: Sized {
    fn saturating_mul_val(self, rhs: Self) -> Self;
}

macro_rules! impl_saturating_ops {
    ($($t:ty),*) => {
        $(
            impl SaturatingAddVal for $t {
                #[inline(always)]
                fn saturating_add_val(self, rhs: Self) -> Self {
                    self.saturating_add(rhs)
                }
            }

            impl SaturatingSubVal for $t {
                #[inline(always)]
                fn saturating_sub_val(self, rhs: Self) -> Self {
                    self.saturating_sub(rhs)
                }
            }

            impl SaturatingMulVal for $t {
                #[inline(always)]
                fn saturating_mul_val(self, rhs: Self) -> Self {
                    self.saturating_mul(rhs)
                }
            }
        )*
    };
}

impl_saturating_ops!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
