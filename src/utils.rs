pub fn base64_enc<T: AsRef<[u8]>>(data: T) -> String {
    use base64::prelude::*;

    BASE64_STANDARD.encode(data)
}
