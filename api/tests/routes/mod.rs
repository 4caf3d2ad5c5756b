mod admin;
mod attendance_test;
mod health_test;
