//! Resource shapes returned by the API and the calls that fetch them.
//!
//! Every resource keeps its hypermedia links and implements
//! [`Dto`](crate::link::Dto), so it can be passed to
//! [`AbiquoClient::follow_link`](crate::rest::AbiquoClient::follow_link).

pub mod config_property;
pub mod disk;
pub mod event;
pub mod repo;
pub mod template;
pub mod user;
pub mod vdc;
pub mod virtual_machine;

pub use config_property::ConfigProperty;
pub use disk::Disk;
pub use event::Event;
pub use repo::Repo;
pub use template::VirtualMachineTemplate;
pub use user::User;
pub use vdc::VirtualDatacenter;
pub use virtual_machine::VirtualMachine;

pub(crate) fn is_zero(v: &i64) -> bool {
    *v == 0
}

pub(crate) fn is_false(v: &bool) -> bool {
    !*v
}
