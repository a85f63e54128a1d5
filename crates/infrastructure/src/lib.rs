pub mod http;
pub mod repositories;
pub mod resolvers;
pub mod system;
