use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_ATTACHMENTS: usize = 10;
pub const MAX_IMAGES: usize = 10;
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

const IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];
const VIDEO_TYPES: [&str; 7] = [
    "video/mp4",
    "video/mov",
    "video/webm",
    "video/avi",
    "video/x-msvideo",
    "video/x-matroska",
    "video/x-flv",
];

/// A declared file handle: name, media type, and size as reported by the
/// picker. No contents are held; nothing in this shell reads real files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedFile {
    pub name: String,
    pub media_type: String,
    pub size_bytes: u64,
}

impl AttachedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size_bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    pub fn is_video(&self) -> bool {
        self.media_type.starts_with("video/")
    }
}

/// Guess a media type from a file name, for files arriving via drag and
/// drop where no declared type is available.
pub fn media_type_for_name(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mov" => "video/mov",
        "webm" => "video/webm",
        "avi" => "video/avi",
        "mkv" => "video/x-matroska",
        "flv" => "video/x-flv",
        _ => "application/octet-stream",
    }
}

/// How the batch was sourced. Picker buttons tag their batches; drag and
/// drop arrives untagged. The tag drives which rejection message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("You can only upload up to 10 files total.")]
    TooManyFiles,
    #[error("Please upload up to 10 images (JPG/PNG/WEBP), each under 10 MB.")]
    ImageBatchRejected,
    #[error("Please upload a video under 10 MB in supported format (MP4, MOV, AVI, MKV, WEBM, FLV).")]
    VideoBatchRejected,
    #[error("{0}")]
    File(String),
}

/// Result of running a batch through admission: the list the store should
/// hold afterwards, plus the user-facing error when anything was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub files: Vec<AttachedFile>,
    pub error: Option<AdmissionError>,
}

fn check_file(file: &AttachedFile) -> Option<String> {
    let is_image = IMAGE_TYPES.contains(&file.media_type.as_str());
    let is_video = VIDEO_TYPES.contains(&file.media_type.as_str());

    if is_image {
        if file.size_bytes > MAX_FILE_BYTES {
            return Some("Image must be under 10 MB".to_string());
        }
    } else if is_video {
        if file.size_bytes > MAX_FILE_BYTES {
            return Some("Video must be under 10 MB in supported format".to_string());
        }
    } else {
        return Some(
            "Only JPG, PNG, WEBP images and MP4, MOV, AVI, MKV, WEBM, FLV videos are supported"
                .to_string(),
        );
    }

    None
}

/// Admit a batch of candidate files against the current attachment list.
///
/// The count and image-cap checks reject the whole batch. Per-file checks
/// admit the valid subset; the reported message then depends on how the
/// batch was tagged: image and video batches get one umbrella message,
/// untagged batches surface the first failing file's own message. That
/// asymmetry is long-standing observed behavior and is pinned by tests
/// below; change it only alongside a product decision.
pub fn admit(
    current: &[AttachedFile],
    incoming: Vec<AttachedFile>,
    batch: Option<BatchKind>,
) -> Admission {
    let current_images = current.iter().filter(|f| f.is_image()).count();
    let incoming_images = incoming.iter().filter(|f| f.is_image()).count();

    if batch == Some(BatchKind::Image) && current_images + incoming_images > MAX_IMAGES {
        return Admission {
            files: current.to_vec(),
            error: Some(AdmissionError::ImageBatchRejected),
        };
    }

    if current.len() + incoming.len() > MAX_ATTACHMENTS {
        return Admission {
            files: current.to_vec(),
            error: Some(AdmissionError::TooManyFiles),
        };
    }

    let mut admitted = current.to_vec();
    let mut first_error: Option<String> = None;
    let mut any_rejected = false;

    for file in incoming {
        match check_file(&file) {
            None => admitted.push(file),
            Some(message) => {
                any_rejected = true;
                if first_error.is_none() {
                    first_error = Some(message);
                }
            }
        }
    }

    let error = if any_rejected {
        Some(match batch {
            Some(BatchKind::Image) => AdmissionError::ImageBatchRejected,
            Some(BatchKind::Video) => AdmissionError::VideoBatchRejected,
            None => AdmissionError::File(first_error.unwrap_or_default()),
        })
    } else {
        None
    };

    Admission {
        files: admitted,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> AttachedFile {
        AttachedFile::new(name, "image/png", 1024)
    }

    fn video(name: &str) -> AttachedFile {
        AttachedFile::new(name, "video/mp4", 2048)
    }

    #[test]
    fn batch_over_the_total_cap_is_rejected_wholesale() {
        let incoming: Vec<_> = (0..11).map(|i| image(&format!("img-{i}.png"))).collect();
        let admission = admit(&[], incoming, None);
        assert!(admission.files.is_empty());
        assert_eq!(admission.error, Some(AdmissionError::TooManyFiles));
    }

    #[test]
    fn total_cap_counts_existing_attachments() {
        let current: Vec<_> = (0..9).map(|i| image(&format!("held-{i}.png"))).collect();
        let incoming = vec![image("a.png"), image("b.png")];
        let admission = admit(&current, incoming, None);
        assert_eq!(admission.files.len(), 9);
        assert_eq!(admission.error, Some(AdmissionError::TooManyFiles));
    }

    #[test]
    fn image_batch_over_the_image_cap_gets_the_umbrella_message() {
        let current: Vec<_> = (0..9).map(|i| image(&format!("held-{i}.png"))).collect();
        let incoming = vec![image("a.png"), image("b.png")];
        let admission = admit(&current, incoming, Some(BatchKind::Image));
        assert_eq!(admission.files.len(), 9);
        assert_eq!(admission.error, Some(AdmissionError::ImageBatchRejected));
    }

    #[test]
    fn unsupported_type_is_rejected_with_its_own_message_when_untagged() {
        let incoming = vec![AttachedFile::new("notes.pdf", "application/pdf", 100)];
        let admission = admit(&[], incoming, None);
        assert!(admission.files.is_empty());
        assert_eq!(
            admission.error,
            Some(AdmissionError::File(
                "Only JPG, PNG, WEBP images and MP4, MOV, AVI, MKV, WEBM, FLV videos are supported"
                    .to_string()
            ))
        );
    }

    #[test]
    fn oversize_image_is_rejected() {
        let big = AttachedFile::new("huge.png", "image/png", MAX_FILE_BYTES + 1);
        let admission = admit(&[], vec![big], None);
        assert!(admission.files.is_empty());
        assert_eq!(
            admission.error,
            Some(AdmissionError::File("Image must be under 10 MB".to_string()))
        );
    }

    #[test]
    fn exactly_at_the_size_cap_is_admitted() {
        let at_cap = AttachedFile::new("cap.png", "image/png", MAX_FILE_BYTES);
        let admission = admit(&[], vec![at_cap.clone()], None);
        assert_eq!(admission.files, vec![at_cap]);
        assert_eq!(admission.error, None);
    }

    // Pins the message decision table: a tagged batch with a per-file
    // failure reports the umbrella message, not the file's own message.
    #[test]
    fn tagged_batches_report_umbrella_messages_for_per_file_failures() {
        let big_video = AttachedFile::new("clip.mp4", "video/mp4", MAX_FILE_BYTES + 1);
        let admission = admit(&[], vec![big_video], Some(BatchKind::Video));
        assert_eq!(admission.error, Some(AdmissionError::VideoBatchRejected));

        let bad_image = AttachedFile::new("scan.tiff", "image/tiff", 100);
        let admission = admit(&[], vec![bad_image], Some(BatchKind::Image));
        assert_eq!(admission.error, Some(AdmissionError::ImageBatchRejected));
    }

    #[test]
    fn valid_subset_is_still_admitted_alongside_a_failure() {
        let incoming = vec![
            image("ok.png"),
            AttachedFile::new("huge.mp4", "video/mp4", MAX_FILE_BYTES + 1),
            video("ok.mp4"),
        ];
        let admission = admit(&[], incoming, None);
        assert_eq!(admission.files, vec![image("ok.png"), video("ok.mp4")]);
        assert_eq!(
            admission.error,
            Some(AdmissionError::File(
                "Video must be under 10 MB in supported format".to_string()
            ))
        );
    }

    #[test]
    fn every_supported_type_passes_admission() {
        for media_type in IMAGE_TYPES.iter().chain(VIDEO_TYPES.iter()) {
            let file = AttachedFile::new("sample", *media_type, 1);
            let admission = admit(&[], vec![file], None);
            assert_eq!(admission.error, None, "rejected {media_type}");
            assert_eq!(admission.files.len(), 1);
        }
    }

    #[test]
    fn media_type_guessing_covers_the_supported_extensions() {
        assert_eq!(media_type_for_name("photo.JPG"), "image/jpeg");
        assert_eq!(media_type_for_name("clip.mkv"), "video/x-matroska");
        assert_eq!(media_type_for_name("archive.zip"), "application/octet-stream");
        assert_eq!(media_type_for_name("noextension"), "application/octet-stream");
    }
}
