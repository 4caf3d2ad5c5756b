mod events_test;
mod test_connection_test;
