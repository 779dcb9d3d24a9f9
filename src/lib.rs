// Copyright (c)  by the latex_calc authors
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
pub mod calculator;
pub mod symbolic;
