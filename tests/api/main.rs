mod helpers;
mod test_failures;
