#![cfg(unix)]

mod helpers;
mod scenarios;
