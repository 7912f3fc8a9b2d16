use kindred_core::SocialNetwork;
use kindred_test_support::fixtures::{NEIGHBOURHOOD, SUSPECTED_LINKS};

/// Builds the eight-person neighbourhood with its suspected links.
#[must_use]
pub fn neighbourhood() -> SocialNetwork<&'static str> {
    let mut network = SocialNetwork::new();
    for &(left, right) in NEIGHBOURHOOD {
        network
            .add_connection(left, right)
            .expect("fixture friendships are valid");
    }
    for &(left, right, probability) in SUSPECTED_LINKS {
        network
            .add_probabilistic_connection(left, right, probability)
            .expect("fixture links are valid");
    }
    network
}
