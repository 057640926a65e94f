#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct KrpcError {
    code: u32,
    message: String,
}

impl KrpcError {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn generic() -> Self {
        Self::new(201, "Generic Error")
    }

    pub fn server() -> Self {
        Self::new(202, "Server Error")
    }

    pub fn protocol() -> Self {
        Self::new(203, "Protocol Error")
    }

    pub fn method_unknown() -> Self {
        Self::new(204, "Method Unknown")
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
