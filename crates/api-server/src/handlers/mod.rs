mod parse_components;

pub use parse_components::parse_components_router;
