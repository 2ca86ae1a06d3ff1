mod chat;

pub use chat::InferenceRequest;
