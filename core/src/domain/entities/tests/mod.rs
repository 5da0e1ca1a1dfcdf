mod auth_provider_tests;
