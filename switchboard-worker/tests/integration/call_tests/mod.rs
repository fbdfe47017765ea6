mod test_answer_for_unknown_peer_ignored;
mod test_hangup_ends_conversation;
mod test_ice_candidate_relayed;
