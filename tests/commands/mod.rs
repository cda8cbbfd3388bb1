mod test_authorize;
mod test_send_message;
