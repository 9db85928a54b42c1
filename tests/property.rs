mod property {
    mod args;
    mod stubs;
    mod utils;
}
