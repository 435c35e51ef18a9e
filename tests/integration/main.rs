//! Client integration tests against an in-process fake backend

mod api_tests;
mod flow_tests;
mod support;
