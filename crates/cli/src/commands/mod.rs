// SPDX-License-Identifier: MIT

pub mod compile;
pub mod run;
pub mod validate;
