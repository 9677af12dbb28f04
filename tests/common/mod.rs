#![allow(dead_code)]

pub mod command;
pub mod index;
pub mod object;
