//! Rust code generated from the bundled fixtures at build time.

pub mod basic {
    include!(concat!(env!("OUT_DIR"), "/basic.rs"));
}

pub mod something {
    include!(concat!(env!("OUT_DIR"), "/something.rs"));
}

pub mod catalog {
    include!(concat!(env!("OUT_DIR"), "/catalog.rs"));
}
