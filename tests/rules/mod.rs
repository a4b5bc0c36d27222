mod md101_test;
mod md102_test;
