mod backends;
mod core;
mod helpers;
