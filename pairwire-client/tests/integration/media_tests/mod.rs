mod test_local_tracks_attached;
mod test_remote_stream_attached_once;
