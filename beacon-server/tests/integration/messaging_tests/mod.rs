mod test_chat_echoes_to_sender;
mod test_offer_relays_to_other_members;
mod test_signal_before_join_is_rejected;
mod test_signal_payloads_pass_through;
