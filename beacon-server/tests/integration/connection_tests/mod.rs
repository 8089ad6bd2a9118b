mod test_disconnect_notifies_remaining_members;
mod test_join_notifies_existing_members;
mod test_join_rejections;
mod test_second_join_implicitly_leaves_first_room;
