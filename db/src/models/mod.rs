pub mod attendance_event;
