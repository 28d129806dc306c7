// Domain layer: quotation data model and derived money amounts.

pub mod model;
