// ============================================================================
// Order Domain - Business Logic for Order Aggregate
// ============================================================================
//
// - Value objects (OrderLine, OrderStatus, TrackingInfo)
// - Events (OrderPlaced, OrderShipped, etc.)
// - Commands (PlaceOrder, ShipOrder, etc.)
// - Errors (OrderError enum)
// - Aggregate (Order with the status workflow)
// - Command Handler (admin status transitions)
// - Sales summary over a set of orders
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod command_handler;
pub mod summary;

pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use command_handler::*;
pub use summary::*;
