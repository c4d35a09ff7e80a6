//! Static privacy-training drills.
//!
//! A small fixed set for now; could move to the repository later if
//! drills ever need to be user-editable.

use serde::Serialize;

/// One privacy rewrite drill.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TrainingChallenge {
    pub id: &'static str,
    pub prompt: &'static str,
    pub risky_text: &'static str,
    pub tips: &'static [&'static str],
}

/// The drill set, in presentation order.
pub const TRAINING_CHALLENGES: [TrainingChallenge; 10] = [
    TrainingChallenge {
        id: "1",
        prompt: "Remove sensitive personal information from this post",
        risky_text: "Hi! I'm Sarah from New York. Call me at 555-1234!",
        tips: &[
            "Remove exact names",
            "Remove phone numbers",
            "Use general locations",
        ],
    },
    TrainingChallenge {
        id: "2",
        prompt: "Make this birthday post privacy-safe",
        risky_text: "Happy birthday to my son James! He turns 8 today, born on March 15, 2016!",
        tips: &["Avoid exact dates of birth", "Use general age references"],
    },
    TrainingChallenge {
        id: "3",
        prompt: "Protect work and contact details in this introduction",
        risky_text: "Hey everyone! I'm Rahul Sharma, living at 23/7 MG Road, Bengaluru. Here's my Aadhaar 1234-5678-9012 and PAN ABCTY1234Z so clients can verify me. You can also call me on 98765-43210 anytime!",
        tips: &[
            "Remove government IDs completely",
            "Generalize addresses",
            "Remove phone numbers",
        ],
    },
    TrainingChallenge {
        id: "4",
        prompt: "Rewrite this travel post without revealing your exact location",
        risky_text: "Currently at Dubai International Airport, Terminal 3, Gate B7. Flight EK-505 to Mumbai delayed by 2 hours. Staying at Hilton Garden Inn, room 402.",
        tips: &[
            "Use city names instead of exact locations",
            "Avoid gate/room numbers",
            "Keep general travel updates",
        ],
    },
    TrainingChallenge {
        id: "5",
        prompt: "Make this job application post safer",
        risky_text: "Just applied to Google! My employee ID at current company is EMP-2024-1156. Email me at john.doe@company.com or call 9876543210.",
        tips: &[
            "Remove employee IDs",
            "Remove personal email addresses",
            "Remove phone numbers",
        ],
    },
    TrainingChallenge {
        id: "6",
        prompt: "Protect all sensitive details in this medical update",
        risky_text: "Just got diagnosed at Apollo Hospital, Bengaluru. My patient ID is APH-2024-88921. Doctor Priya Sharma prescribed medication. Insurance claim number: INS-445-2024. Follow-up on January 25, 2024 at 3:30 PM.",
        tips: &[
            "Remove patient IDs",
            "Remove doctor names",
            "Remove exact appointments",
            "Remove claim numbers",
        ],
    },
    TrainingChallenge {
        id: "7",
        prompt: "Secure this financial transaction post",
        risky_text: "Transferred \u{20b9}50,000 from my HDFC account (A/C: 1234567890) to Airtel (transaction ID: TXN-2024-998877). UPI ID: john@paytm. Receipt shows transaction on Dec 15, 2024 at 14:23:45.",
        tips: &[
            "Remove account numbers",
            "Remove transaction IDs",
            "Remove UPI IDs",
            "Generalize timestamps",
        ],
    },
    TrainingChallenge {
        id: "8",
        prompt: "Anonymize this family emergency post",
        risky_text: "My daughter Emily (DOB: 04/12/2015, Aadhaar: 9988-7766-5544) is admitted at AIIMS, New Delhi, Ward 5C, Bed 23. Emergency contact: Dr. Amit Kumar, 9123456789. Insurance: Policy #POL-2023-7788.",
        tips: &[
            "Remove all government IDs",
            "Remove exact ward/bed numbers",
            "Remove doctor contacts",
            "Remove policy numbers",
        ],
    },
    TrainingChallenge {
        id: "9",
        prompt: "Completely anonymize this detailed business post",
        risky_text: "Our startup (CIN: U74999KA2023PTC165432) raised $2M! Registered at #45, 3rd Floor, Koramangala, Bengaluru-560034. Contact: ceo@startup.com, +91-80-12345678. PAN: AABCS1234F, GST: 29AABCS1234F1Z5. Pitch deck: drive.google.com/file/d/abc123xyz",
        tips: &[
            "Remove all registration numbers",
            "Remove exact addresses with pin codes",
            "Remove tax IDs",
            "Remove document links",
            "Remove email/phone",
        ],
    },
    TrainingChallenge {
        id: "10",
        prompt: "Secure this complex identity verification post",
        risky_text: "Verified my identity using Aadhaar 1111-2222-3333, PAN ABCDE1234F, Passport J1234567 issued on 01/Jan/2020 from Mumbai office. Driving License: MH-01-2024-123456. Voter ID: ABC1234567. Bank verified via passbook showing IFSC: HDFC0001234, Account: 12340056789.",
        tips: &[
            "Remove ALL government-issued IDs",
            "Remove bank details completely",
            "Remove issue dates and locations",
            "Keep only general concept",
        ],
    },
];

/// Look up a drill by id.
pub fn find_challenge(id: &str) -> Option<&'static TrainingChallenge> {
    TRAINING_CHALLENGES.iter().find(|c| c.id == id)
}

/// The drill served when no id is given.
pub fn default_challenge() -> &'static TrainingChallenge {
    &TRAINING_CHALLENGES[0]
}
