pub mod dictionary_entry;
pub mod saved_result;
