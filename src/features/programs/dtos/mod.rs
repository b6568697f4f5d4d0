mod program_dto;

pub use program_dto::{CoordinatorDto, CreateProgramDto, ProgramResponseDto, YearFilterQuery};
