mod event_loop_tests;
mod recall_tests;
mod translation_tests;
