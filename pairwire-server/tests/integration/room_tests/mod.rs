mod test_create_and_join;
