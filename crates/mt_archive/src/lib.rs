pub mod container;

pub use container::{read_container, write_container, Container, ContainerError, ContainerResult};
