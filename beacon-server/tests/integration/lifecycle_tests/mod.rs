mod test_end_call;
mod test_leave_room;
