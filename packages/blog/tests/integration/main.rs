mod locale_activation_tests;
mod post_persistence_tests;
