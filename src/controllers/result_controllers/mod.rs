pub mod get_results;
