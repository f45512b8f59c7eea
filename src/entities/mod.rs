pub mod prelude;

pub mod foods;
pub mod locations;
pub mod meetups;
pub mod movies;
pub mod trails;
pub mod weathers;
