pub mod attendance_service;
