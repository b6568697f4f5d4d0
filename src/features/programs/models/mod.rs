mod program;

pub use program::{Program, ProgramWithCoordinator};
