#[macro_use]
extern crate bitflags;

#[macro_use]
extern crate slog;

extern crate nalgebra as na;
extern crate nalgebra_glm as glm;

pub mod common;
pub mod mesh;
pub mod procedural;
pub mod upload;
