pub mod hit_testing;
