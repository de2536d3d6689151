mod bandwidth;
mod plans;
mod port_assignments;
mod port_spec;
mod topology;

pub use bandwidth::*;
pub use plans::*;
pub use port_assignments::*;
pub use port_spec::*;
pub use topology::*;
