//! Integration tests for CapabilityClient against a mockito server.

mod integration;
