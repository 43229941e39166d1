mod negotiation_tests;
mod range_tests;
mod report_tests;
