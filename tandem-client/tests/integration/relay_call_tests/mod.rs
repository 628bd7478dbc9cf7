pub mod test_two_party_call;
