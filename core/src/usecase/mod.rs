pub mod semester_setup;
