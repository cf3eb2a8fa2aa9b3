//! Main module for Bali notation functionality

pub mod ast;
pub mod formats;
pub mod grammar;
pub mod lexing;
pub mod parsing;
pub mod token;
pub mod validation;
pub mod visiting;
