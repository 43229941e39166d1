mod check_pipeline_tests;
mod session_lifecycle_tests;
