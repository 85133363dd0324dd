//! IMDb-backed metadata lookup and genre listings.

mod client;
mod pages;
mod suggestion;

pub use client::ImdbClient;
