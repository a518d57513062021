// Purpose: Voice management, polyphony, note and controller dispatch
// voice renders one note; poly owns the voice bank; engine adds patches on top

pub mod allocator;
pub mod bus;
pub mod controllers;
pub mod engine;
pub mod message;
pub mod params;
pub mod poly;
pub mod topology;
pub mod voice;
