#[path = "lz/search.rs"]
mod search;
#[path = "lz/lazy.rs"]
mod lazy;
#[path = "lz/reconstruct.rs"]
mod reconstruct;
