mod engine;
mod events;
mod recall;
mod state;
mod tracker;
mod translation;
mod vocabulary;

#[cfg(test)]
mod tests;

pub use engine::Engine;
pub use events::event_loop;
pub use state::EngineState;
pub use translation::TranslationQueue;
