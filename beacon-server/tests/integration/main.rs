
mod connection_tests;
mod lifecycle_tests;
mod messaging_tests;
