// Domain layer: contact models and ports (mail transport, mail settings).

pub mod model;
pub mod ports;
